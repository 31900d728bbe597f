mod twelfths_tests;
